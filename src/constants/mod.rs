pub mod rand48;
