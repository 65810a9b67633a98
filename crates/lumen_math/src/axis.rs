/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y,
    Z,
}

impl Axis {
    /// Map 0, 1, 2 to X, Y, Z. Anything above 2 clamps to Z.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index_round_trip() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(Axis::from_index(axis.index()), axis);
        }
        assert_eq!(Axis::from_index(7), Axis::Z);
    }
}
