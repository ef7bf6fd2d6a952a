/// Load lifecycle of a screen. `Error` is terminal for the
/// session: recovery means building a fresh view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

impl Phase {
    pub fn is_ready(&self) -> bool {
        matches!(self, Phase::Ready)
    }
}

/// Dismissible user notice.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Add / edit modal. `target: None` is add mode.
#[derive(Debug, Clone, Default)]
pub enum Modal<F> {
    #[default]
    Closed,
    Open { target: Option<u32>, form: F },
}

impl<F> Modal<F> {
    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }
}
