pub mod declaration;
pub mod keys;
pub mod scanner;
