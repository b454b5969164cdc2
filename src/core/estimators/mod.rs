pub mod gaussian_estimator;
