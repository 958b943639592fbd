/// Logistic regression over sparse text features
pub mod logistic;
