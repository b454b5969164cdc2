use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;

/// A single observation. Attribute values are indexed over the full header,
/// class included; missing values are stored as NaN.
pub trait Instance {
    fn weight(&self) -> f64;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn is_missing_at_index(&self, index: usize) -> bool {
        self.value_at_index(index).is_none_or(f64::is_nan)
    }

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header().attribute_at_index(index)
    }

    fn number_of_attributes(&self) -> usize {
        self.header().number_of_attributes()
    }

    fn class_index(&self) -> usize {
        self.header().class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.value_at_index(self.class_index())
            .filter(|v| !v.is_nan())
    }

    fn number_of_classes(&self) -> usize {
        self.header().number_of_classes()
    }

    fn header(&self) -> &InstanceHeader;
}
