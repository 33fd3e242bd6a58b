/// Typed enumeration of slices indexed by a newtype such as `EmployeeIdx` or `LegIdx`.
pub trait EnumerateIdx<T> {
    fn enumerate_idx<'a, Idx: From<usize>>(&'a self) -> impl Iterator<Item = (Idx, &'a T)>
    where
        T: 'a;
}

impl<T> EnumerateIdx<T> for [T] {
    fn enumerate_idx<'a, Idx: From<usize>>(&'a self) -> impl Iterator<Item = (Idx, &'a T)>
    where
        T: 'a,
    {
        self.iter()
            .enumerate()
            .map(|(index, item)| (Idx::from(index), item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_index_newtype!(SampleIdx);

    #[test]
    fn test_enumerate_idx() {
        let values = ["a", "b", "c"];
        let indexed = values
            .enumerate_idx::<SampleIdx>()
            .map(|(idx, &value)| (idx.get(), value))
            .collect::<Vec<_>>();

        assert_eq!(indexed, vec![(0, "a"), (1, "b"), (2, "c")]);
    }
}
