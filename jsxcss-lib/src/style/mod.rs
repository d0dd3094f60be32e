pub mod corrections;
pub mod declaration;
pub mod emit;
pub mod index;
pub mod owned_css;
