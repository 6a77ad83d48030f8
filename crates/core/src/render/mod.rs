/// Lamp that mirrors the current light state. Write-only from the player's
/// point of view.
pub trait Indicator {
    fn set_active(&mut self, active: bool);
}

/// Play/pause control whose label reflects the playback state.
pub trait ControlSurface {
    fn set_label(&mut self, label: &str);
}

/// In-memory indicator and control pair. The command line front end draws it,
/// tests inspect it.
#[derive(Debug, Default, Clone)]
pub struct Panel {
    active: bool,
    label: String,
    transitions: usize,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of times the lamp changed state.
    pub fn transitions(&self) -> usize {
        self.transitions
    }

    /// Single-line rendering for terminals.
    pub fn render_line(&self) -> String {
        let lamp = if self.active { '●' } else { '○' };
        format!("{lamp}  [ {} ]", self.label)
    }
}

impl Indicator for Panel {
    fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.transitions += 1;
        }
        self.active = active;
    }
}

impl ControlSurface for Panel {
    fn set_label(&mut self, label: &str) {
        if self.label != label {
            self.label = label.to_string();
        }
    }
}
