use crate::model::*;

pub trait FindNearest<T: Sized + HasPosition> {
    /// Nearest item by straight-line range. The first encountered item wins
    /// ties.
    fn find_nearest_linear(self, start_pos: Position) -> Option<T>
    where
        Self: Sized;

    /// Nearest item by range along with that range.
    fn find_nearest_linear_with_range(self, start_pos: Position) -> Option<(u32, T)>
    where
        Self: Sized;
}

impl<I> FindNearest<I::Item> for I
where
    I: Iterator,
    I::Item: HasPosition,
{
    fn find_nearest_linear(self, start_pos: Position) -> Option<I::Item> {
        self.find_nearest_linear_with_range(start_pos).map(|(_, pos_object)| pos_object)
    }

    fn find_nearest_linear_with_range(self, start_pos: Position) -> Option<(u32, I::Item)> {
        self.map(|pos_object| (start_pos.get_range_to(pos_object.pos()), pos_object))
            .min_by_key(|(length, _)| *length)
    }
}
