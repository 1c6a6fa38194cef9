use thiserror::Error;

/// Errors produced by the thermistor models and the resistor searches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    /// A parameter is outside the domain of the physical model.
    ///
    /// Raised up front, before any search work is done.
    #[error("invalid input: {context}")]
    InvalidInput { context: String },

    /// No grid point keeps both boundary voltages inside the ADC window with a
    /// positive swing. `in_window` counts the pairs that stayed inside the window.
    #[error(
        "no feasible solution found ({evaluated} combinations evaluated, \
         {in_window} inside the ADC window, none with a positive swing)"
    )]
    NoFeasibleSolution { evaluated: u64, in_window: u64 },

    /// A formula produced a non-finite value or divided by zero.
    #[error("numerical error: {context}")]
    Numerical { context: String },
}

impl DesignError {
    pub fn invalid(context: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.into(),
        }
    }

    pub fn numerical(context: impl Into<String>) -> Self {
        Self::Numerical {
            context: context.into(),
        }
    }

    /// Process exit code used by the binary for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            DesignError::InvalidInput { .. } => 2,
            DesignError::NoFeasibleSolution { .. } => 3,
            DesignError::Numerical { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DesignError> for AppError {
    fn from(err: DesignError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
