mod station_repository_impl;

pub use station_repository_impl::StationRepositoryImpl;
