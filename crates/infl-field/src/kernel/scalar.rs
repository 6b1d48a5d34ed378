//! Reference kernel: one unit at a time.

use crate::UnitSource;

use super::{FieldKernel, remainder};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ScalarKernel;

impl FieldKernel for ScalarKernel {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn lanes(&self) -> usize {
        1
    }

    #[inline]
    fn point<U: UnitSource + ?Sized>(&self, units: &U, x: f32, y: f32) -> f32 {
        remainder(units, 0, x, y)
    }
}
