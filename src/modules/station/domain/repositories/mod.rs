mod station_repository;

#[cfg(test)]
pub use station_repository::MockStationRepository;
pub use station_repository::StationRepository;
