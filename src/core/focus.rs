//! Keyboard focus over the sheet's controls.

/// The focusable controls inside the sheet, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Closed,
    Half,
    Open,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Closed, Control::Half, Control::Open];

    pub fn label(self) -> &'static str {
        match self {
            Control::Closed => "Closed",
            Control::Half => "Half",
            Control::Open => "Open",
        }
    }

    fn position(self) -> usize {
        match self {
            Control::Closed => 0,
            Control::Half => 1,
            Control::Open => 2,
        }
    }
}

/// Tab-order cursor. When `trapped`, moving past either end wraps around;
/// otherwise focus leaves the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusRing {
    focused: Option<Control>,
}

impl FocusRing {
    pub fn focused(&self) -> Option<Control> {
        self.focused
    }

    pub fn focus(&mut self, control: Option<Control>) {
        self.focused = control;
    }

    pub fn focus_first(&mut self) {
        self.focused = Some(Control::ALL[0]);
    }

    /// Handle Tab (`backwards = false`) or Shift-Tab.
    pub fn advance(&mut self, backwards: bool, trapped: bool) -> Option<Control> {
        let last = Control::ALL.len() - 1;
        self.focused = match self.focused {
            None if backwards => Some(Control::ALL[last]),
            None => Some(Control::ALL[0]),
            Some(current) => {
                let pos = current.position();
                match (backwards, pos) {
                    (true, 0) if trapped => Some(Control::ALL[last]),
                    (true, 0) => None,
                    (true, p) => Some(Control::ALL[p - 1]),
                    (false, p) if p == last && trapped => Some(Control::ALL[0]),
                    (false, p) if p == last => None,
                    (false, p) => Some(Control::ALL[p + 1]),
                }
            }
        };
        self.focused
    }
}
