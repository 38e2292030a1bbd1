use crate::error::BoardsError;

pub type BoardsResult<T> = Result<T, BoardsError>;
