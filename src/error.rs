use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("club {club}: {metric} is not a finite number")]
    NonFinite { club: String, metric: &'static str },

    #[error("club {club}: {metric} is negative")]
    Negative { club: String, metric: &'static str },
}
