pub mod bucket_configurations;
pub mod buckets;
