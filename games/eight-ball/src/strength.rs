//! Hold-to-charge shot strength.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthBar {
    rate: f32,
    value: f32,
    charging: bool,
}

impl StrengthBar {
    pub fn new(rate: f32) -> Self {
        Self {
            rate,
            value: 0.0,
            charging: false,
        }
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Show the bar, starting from empty. No effect while already charging.
    pub fn begin(&mut self) {
        if !self.charging {
            self.charging = true;
            self.value = 0.0;
        }
    }

    /// One fixed step of charge.
    pub fn charge(&mut self) {
        if self.charging {
            self.value = (self.value + self.rate).clamp(0.0, 1.0);
        }
    }

    /// Hide the bar and hand back its fill, if it was up.
    pub fn release(&mut self) -> Option<f32> {
        if !self.charging {
            return None;
        }
        self.charging = false;
        Some(self.value)
    }

    pub fn cancel(&mut self) {
        self.charging = false;
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charges_and_clamps() {
        let mut bar = StrengthBar::new(0.01);
        bar.begin();
        for _ in 0..50 {
            bar.charge();
        }
        assert!((bar.value() - 0.5).abs() < 1e-4);
        for _ in 0..100 {
            bar.charge();
        }
        assert_eq!(bar.value(), 1.0);
        assert_eq!(bar.release(), Some(1.0));
        assert!(!bar.is_charging());
    }

    #[test]
    fn release_without_begin_is_none() {
        let mut bar = StrengthBar::new(0.01);
        bar.charge();
        assert_eq!(bar.value(), 0.0);
        assert_eq!(bar.release(), None);
    }

    #[test]
    fn begin_while_charging_keeps_value() {
        let mut bar = StrengthBar::new(0.1);
        bar.begin();
        bar.charge();
        bar.charge();
        bar.begin();
        assert!((bar.value() - 0.2).abs() < 1e-6);

        bar.release();
        bar.begin();
        assert_eq!(bar.value(), 0.0);
    }
}
