use super::Serializer;

/// SQL dialect the serializer targets.
///
/// The generated text stays ANSI-shaped; flavors only diverge where the
/// dialects force it (regex operators, day-of-week extraction).
#[derive(Debug)]
pub(super) enum Flavor {
    Ansi,
    Mysql,
    Postgresql,
}

impl Serializer {
    pub fn ansi() -> Serializer {
        Serializer {
            flavor: Flavor::Ansi,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }
}
