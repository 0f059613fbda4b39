mod station_name;

pub use station_name::StationName;
