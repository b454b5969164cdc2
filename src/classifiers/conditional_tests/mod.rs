pub mod attribute_split_suggestion;
