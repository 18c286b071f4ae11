use services::GuideError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    UnknownStep,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::UnknownStep => "That step isn't part of this guide.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<GuideError> for ViewError {
    fn from(err: GuideError) -> Self {
        match err {
            GuideError::Navigation(_) | GuideError::Progress(_) => Self::UnknownStep,
            _ => Self::Unknown,
        }
    }
}
