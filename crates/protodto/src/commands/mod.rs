pub mod emitters;
pub mod generate;
