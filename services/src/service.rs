use sea_orm::EntityTrait;

/// Converts a request-shaped value into the active model written to `E`'s table.
///
/// Only fields carried by the value are `Set`; everything else stays `NotSet`
/// so updates touch exactly what the caller supplied.
pub trait ToActiveModel<E>
where
    E: EntityTrait,
{
    fn into_active_model(self) -> E::ActiveModel;
}
