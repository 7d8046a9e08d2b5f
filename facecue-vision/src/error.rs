use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{outline} has {actual} points, at least {required} are required")]
    IndexOutOfRange {
        outline: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("expected {expected} landmarks, got {actual}")]
    InvalidLandmarkCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
