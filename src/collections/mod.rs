mod persistent_list;

pub use persistent_list::*;
