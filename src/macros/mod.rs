mod str_enum;

pub(crate) use self::str_enum::*;
