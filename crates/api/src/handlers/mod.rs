pub mod emp;
pub mod frontend;
pub mod record;
pub mod upload;
