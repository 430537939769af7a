/// A detached, editable copy of an entity's user-editable fields.
///
/// Forms and commands work on the copy; `apply_to` writes it back in one step.
pub trait Editable<T>: Sized {
    fn from_entity(entity: &T) -> Self;
    fn apply_to(self, entity: &mut T);
}
