pub type FootprintResult<T> = Result<T, FootprintError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FootprintErrorCategory {
    InvalidInput,
    InvalidPeriod,
    UnknownRegion,
    UnknownFeedType,
    UndefinedIntensity,
    Io,
}

impl FootprintErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InvalidInput => 2,
            Self::InvalidPeriod => 3,
            Self::UnknownRegion | Self::UnknownFeedType => 4,
            Self::UndefinedIntensity => 5,
            Self::Io => 6,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInputError",
            Self::InvalidPeriod => "InvalidPeriodError",
            Self::UnknownRegion => "UnknownRegionError",
            Self::UnknownFeedType => "UnknownFeedTypeError",
            Self::UndefinedIntensity => "UndefinedIntensityError",
            Self::Io => "IoError",
        }
    }
}

/// Error raised by any stage of an estimate.
///
/// `placeholder` is a stable dotted code naming the offending field
/// (`INPUT.PUMPING_PUMP_EFFICIENCY`, `FACTOR.GRID_COUNTRY`, ...) so callers can
/// point the user at the input that needs fixing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} [{placeholder}] {message}", category.as_str())]
pub struct FootprintError {
    category: FootprintErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl FootprintError {
    pub fn new(
        category: FootprintErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn invalid_input(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FootprintErrorCategory::InvalidInput, placeholder, message)
    }

    pub fn invalid_period(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FootprintErrorCategory::InvalidPeriod, placeholder, message)
    }

    pub fn unknown_region(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FootprintErrorCategory::UnknownRegion, placeholder, message)
    }

    pub fn unknown_feed_type(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FootprintErrorCategory::UnknownFeedType, placeholder, message)
    }

    pub fn undefined_intensity(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            FootprintErrorCategory::UndefinedIntensity,
            placeholder,
            message,
        )
    }

    pub fn io(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FootprintErrorCategory::Io, placeholder, message)
    }

    pub const fn category(&self) -> FootprintErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }
}
