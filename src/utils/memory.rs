use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

/// Deep byte-size measurement of in-memory structures.
///
/// Owned data is always counted. Data behind `Rc`/`Arc` is counted the first
/// time its allocation is reached and skipped afterwards, so a header shared by
/// every instance of a stream is only paid for once per measurement.
#[derive(Default)]
pub struct MemoryMeter {
    shared_seen: HashSet<usize>,
}

impl MemoryMeter {
    #[inline]
    pub fn new() -> Self {
        Self {
            shared_seen: HashSet::new(),
        }
    }

    #[inline]
    fn measure<T: MemorySized + ?Sized>(&mut self, value: &T) -> usize {
        value.inline_size() + value.extra_heap_size(self)
    }

    /// Size of `value` including everything it owns.
    #[inline]
    pub fn measure_root<T: MemorySized + ?Sized>(value: &T) -> usize {
        let mut meter = MemoryMeter::new();
        meter.measure(value)
    }

    /// Heap bytes owned by a field, excluding the field's inline bytes which
    /// are already part of its container's `inline_size`.
    #[inline]
    pub fn measure_field<T: MemorySized + ?Sized>(&mut self, value: &T) -> usize {
        let total = self.measure(value);
        total.saturating_sub(value.inline_size())
    }

    #[inline]
    fn measure_shared<T: MemorySized + ?Sized>(&mut self, value: &T) -> usize {
        let raw = std::ptr::from_ref(value) as *const () as usize;
        if self.shared_seen.insert(raw) {
            self.measure(value)
        } else {
            0
        }
    }
}

pub trait MemorySized {
    fn inline_size(&self) -> usize {
        std::mem::size_of_val(self)
    }

    fn extra_heap_size(&self, _meter: &mut MemoryMeter) -> usize {
        0
    }

    fn deep_size(&self) -> usize {
        MemoryMeter::measure_root(self)
    }

    fn measure_with(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure(self)
    }
}

macro_rules! impl_memory_for_primitives {
    ($($t:ty),* $(,)?) => {
        $(impl MemorySized for $t {})*
    };
}

impl_memory_for_primitives!(u8, u16, u32, u64, usize, i32, i64, f32, f64, bool, char);

impl MemorySized for String {
    fn inline_size(&self) -> usize {
        std::mem::size_of::<String>()
    }

    fn extra_heap_size(&self, _meter: &mut MemoryMeter) -> usize {
        self.capacity()
    }
}

impl<T: MemorySized> MemorySized for Vec<T> {
    fn inline_size(&self) -> usize {
        std::mem::size_of::<Vec<T>>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        let mut total = self.capacity() * std::mem::size_of::<T>();
        for item in self.iter() {
            total += meter.measure_field(item);
        }
        total
    }
}

impl<T: MemorySized> MemorySized for Option<T> {
    fn inline_size(&self) -> usize {
        std::mem::size_of::<Option<T>>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        match self {
            Some(value) => meter.measure_field(value),
            None => 0,
        }
    }
}

impl<T: MemorySized + ?Sized> MemorySized for Box<T> {
    fn inline_size(&self) -> usize {
        std::mem::size_of::<Box<T>>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        self.as_ref().measure_with(meter)
    }
}

impl<T: MemorySized + ?Sized> MemorySized for Rc<T> {
    fn inline_size(&self) -> usize {
        std::mem::size_of::<Rc<T>>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_shared(self.as_ref())
    }
}

impl<T: MemorySized + ?Sized> MemorySized for Arc<T> {
    fn inline_size(&self) -> usize {
        std::mem::size_of::<Arc<T>>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        meter.measure_shared(self.as_ref())
    }
}

impl<T: MemorySized + ?Sized> MemorySized for RefCell<T> {
    fn inline_size(&self) -> usize {
        std::mem::size_of_val(self)
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        let borrowed = self.borrow();
        meter.measure_field(&*borrowed)
    }
}

impl<K, V, S> MemorySized for HashMap<K, V, S>
where
    K: MemorySized,
    V: MemorySized,
    S: std::hash::BuildHasher,
{
    fn inline_size(&self) -> usize {
        std::mem::size_of::<HashMap<K, V, S>>()
    }

    fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
        let mut total = self.capacity() * std::mem::size_of::<(K, V)>();
        for (k, v) in self.iter() {
            total += meter.measure_field(k);
            total += meter.measure_field(v);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: Vec<f64>,
        right: Option<Box<Vec<f64>>>,
    }

    impl MemorySized for Pair {
        fn extra_heap_size(&self, meter: &mut MemoryMeter) -> usize {
            meter.measure_field(&self.left) + meter.measure_field(&self.right)
        }
    }

    #[test]
    fn vec_counts_capacity_not_len() {
        let mut v: Vec<f64> = Vec::with_capacity(16);
        v.push(1.0);
        let expected = size_of::<Vec<f64>>() + 16 * size_of::<f64>();
        assert_eq!(MemoryMeter::measure_root(&v), expected);
    }

    #[test]
    fn first_field_is_not_mistaken_for_its_container() {
        let pair = Pair {
            left: vec![1.0; 4],
            right: None,
        };
        let size = MemoryMeter::measure_root(&pair);
        assert!(size >= size_of::<Pair>() + 4 * size_of::<f64>());
    }

    #[test]
    fn boxed_values_include_their_heap() {
        let pair = Pair {
            left: Vec::new(),
            right: Some(Box::new(vec![0.0; 8])),
        };
        let size = MemoryMeter::measure_root(&pair);
        assert_eq!(
            size,
            size_of::<Pair>() + size_of::<Vec<f64>>() + 8 * size_of::<f64>()
        );
    }

    #[test]
    fn shared_allocations_are_counted_once() {
        let shared = Arc::new(vec![0.0f64; 32]);
        let holders = vec![shared.clone(), shared.clone(), shared];
        let once = size_of::<Vec<f64>>() + 32 * size_of::<f64>();
        let expected = size_of::<Vec<Arc<Vec<f64>>>>() + 3 * size_of::<Arc<Vec<f64>>>() + once;
        assert_eq!(MemoryMeter::measure_root(&holders), expected);
    }

    #[test]
    fn deep_size_matches_measure_root() {
        let s = String::with_capacity(10);
        assert_eq!(s.deep_size(), MemoryMeter::measure_root(&s));
    }
}
