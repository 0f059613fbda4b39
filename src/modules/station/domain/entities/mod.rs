mod station;

pub use station::Station;
