pub mod clock;
pub mod value_objects;
