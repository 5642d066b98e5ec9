use crate::macros::define_str_enum;

define_str_enum! {
    /// Archive-level properties picked up from a listing.
    MetaField,
    (Type, "Type"),
    (Method, "Method"),
    (Solid, "Solid"),
    (Blocks, "Blocks"),
    (PhysicalSize, "Physical Size"),
    (HeadersSize, "Headers Size"),
}
