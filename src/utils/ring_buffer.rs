//! Overwriting ring buffer for sliding windows.

/// A fixed-capacity circular buffer.
///
/// When full, [`push`](RingBuffer::push) overwrites the oldest element and
/// returns it. Single-owner; each stream keeps its own instance.
///
/// # Example
/// ```
/// use staffline::utils::RingBuffer;
///
/// let mut buf = RingBuffer::new(3);
/// for v in [1.0, 2.0, 3.0, 4.0] {
///     buf.push(v);
/// }
/// assert_eq!(buf.len(), 3);
/// assert_eq!(buf.iter().copied().collect::<Vec<f32>>(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Vec<Option<T>>,
    head: usize, // oldest element
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a buffer holding at most `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` is 0. Owners validate sizes before building one.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self {
            buf,
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Appends `item`, returning the evicted oldest element when full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let cap = self.buf.len();
        let tail = (self.head + self.len) % cap;
        let evicted = self.buf[tail].replace(item);
        if self.len == cap {
            self.head = (self.head + 1) % cap;
        } else {
            self.len += 1;
        }
        evicted
    }

    /// Drops every element; capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in &mut self.buf {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let cap = self.buf.len();
        (0..self.len).filter_map(move |i| self.buf[(self.head + i) % cap].as_ref())
    }

    /// Most recently pushed element.
    pub fn last(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let cap = self.buf.len();
        self.buf[(self.head + self.len - 1) % cap].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut buf = RingBuffer::new(2);
        assert!(buf.is_empty());
        assert_eq!(buf.push(1), None);
        assert_eq!(buf.push(2), None);
        assert!(buf.is_full());
        assert_eq!(buf.push(3), Some(1));
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(buf.last(), Some(&3));
    }

    #[test]
    fn test_clear() {
        let mut buf = RingBuffer::new(3);
        buf.push('a');
        buf.push('b');
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.last(), None);
        assert_eq!(buf.capacity(), 3);
        buf.push('c');
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec!['c']);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _ = RingBuffer::<f32>::new(0);
    }
}
