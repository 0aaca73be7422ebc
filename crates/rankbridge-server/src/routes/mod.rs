pub mod ranks;
