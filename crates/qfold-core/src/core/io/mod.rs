pub mod contact_table;
pub mod pdb;
pub mod results;
pub mod traits;
