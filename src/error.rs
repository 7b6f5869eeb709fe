use std::fmt;

#[derive(Debug)]
pub enum FluidError {
    /// Grid size must be at least one interior cell.
    InvalidSize(usize),
    /// Impulse targeted a cell outside the interior `1..=size`.
    OutOfBounds { x: usize, y: usize, size: usize },
    /// NaN or infinite impulse value.
    NonFinite { x: usize, y: usize },
    InvalidParameter { name: &'static str, value: f32 },
    Io(std::io::Error),
    Config(serde_json::Error),
    Image(image::ImageError),
}

impl fmt::Display for FluidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FluidError::InvalidSize(size) => write!(f, "invalid grid size {size}"),
            FluidError::OutOfBounds { x, y, size } => {
                write!(f, "cell ({x}, {y}) is outside the interior 1..={size}")
            }
            FluidError::NonFinite { x, y } => write!(f, "non-finite impulse at ({x}, {y})"),
            FluidError::InvalidParameter { name, value } => {
                write!(f, "parameter {name} must be finite and non-negative, got {value}")
            }
            FluidError::Io(err) => write!(f, "io error: {err}"),
            FluidError::Config(err) => write!(f, "config error: {err}"),
            FluidError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for FluidError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FluidError::Io(err) => Some(err),
            FluidError::Config(err) => Some(err),
            FluidError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FluidError {
    fn from(err: std::io::Error) -> Self {
        FluidError::Io(err)
    }
}

impl From<serde_json::Error> for FluidError {
    fn from(err: serde_json::Error) -> Self {
        FluidError::Config(err)
    }
}

impl From<image::ImageError> for FluidError {
    fn from(err: image::ImageError) -> Self {
        FluidError::Image(err)
    }
}
