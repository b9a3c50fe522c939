pub mod skin_ratio_classifier;
