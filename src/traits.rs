/// Boolean operations between two solids
pub trait CSGOps: Sized {
    /// Space covered by either solid
    fn union(&self, other: &Self) -> Self;

    /// Space covered by `self` but not by `other`
    fn difference(&self, other: &Self) -> Self;

    /// Space covered by both solids
    fn intersection(&self, other: &Self) -> Self;
}
