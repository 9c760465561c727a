use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! wire_label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    pub fn wire_value(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }

    /// Label used in the result heading.
    pub fn display_label(self) -> &'static str {
        match self {
            Gender::Male => "男性",
            Gender::Female => "女性",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender value '{0}', expected 'm' or 'f'")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

wire_label_enum!(
    /// The five classical kaku scores, in rendering order.
    Kaku {
        Heaven => "天格",
        Person => "人格",
        Earth => "地格",
        Outer => "外格",
        Total => "総格",
    }
);

impl Kaku {
    pub fn slot_id(self) -> SlotId {
        match self {
            Kaku::Heaven => SlotId::Tenkaku,
            Kaku::Person => SlotId::Jinkaku,
            Kaku::Earth => SlotId::Jikaku,
            Kaku::Outer => SlotId::Gaikaku,
            Kaku::Total => SlotId::Soukaku,
        }
    }
}

/// A result category: one of the five kaku or the three-element configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Primary(Kaku),
    Configuration,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Primary(kaku) => kaku.label(),
            Category::Configuration => "三才配置",
        }
    }

    pub fn slot_id(self) -> SlotId {
        match self {
            Category::Primary(kaku) => kaku.slot_id(),
            Category::Configuration => SlotId::Sansai,
        }
    }
}

/// Stable identifiers of the result slots on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    Tenkaku,
    Jinkaku,
    Jikaku,
    Gaikaku,
    Soukaku,
    Sansai,
}

impl SlotId {
    pub const ALL: [SlotId; 6] = [
        SlotId::Tenkaku,
        SlotId::Jinkaku,
        SlotId::Jikaku,
        SlotId::Gaikaku,
        SlotId::Soukaku,
        SlotId::Sansai,
    ];

    pub fn category(self) -> Category {
        match self {
            SlotId::Tenkaku => Category::Primary(Kaku::Heaven),
            SlotId::Jinkaku => Category::Primary(Kaku::Person),
            SlotId::Jikaku => Category::Primary(Kaku::Earth),
            SlotId::Gaikaku => Category::Primary(Kaku::Outer),
            SlotId::Soukaku => Category::Primary(Kaku::Total),
            SlotId::Sansai => Category::Configuration,
        }
    }
}

wire_label_enum!(
    /// Severity vocabulary, ordered from best to worst.
    Fortune {
        Daikichi => "大吉",
        Chukichi => "中吉",
        Shokichi => "小吉",
        Kichi => "吉",
        Hankichi => "半吉",
        Suekichi => "末吉",
        Hankyo => "半凶",
        Kyo => "凶",
        Daikyo => "大凶",
    }
);

impl Fortune {
    pub fn style(self) -> FortuneStyle {
        match self {
            Fortune::Daikichi => FortuneStyle::Daikichi,
            Fortune::Chukichi => FortuneStyle::Chukichi,
            Fortune::Shokichi => FortuneStyle::Shokichi,
            Fortune::Kichi => FortuneStyle::Kichi,
            Fortune::Hankichi => FortuneStyle::Hankichi,
            Fortune::Suekichi => FortuneStyle::Suekichi,
            Fortune::Hankyo => FortuneStyle::Hankyo,
            Fortune::Kyo => FortuneStyle::Kyo,
            Fortune::Daikyo => FortuneStyle::Daikyo,
        }
    }
}

/// Visual marker applied to a fortune element. One per severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortuneStyle {
    Daikichi,
    Chukichi,
    Shokichi,
    Kichi,
    Hankichi,
    Suekichi,
    Hankyo,
    Kyo,
    Daikyo,
}

impl FortuneStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            FortuneStyle::Daikichi => "daikichi",
            FortuneStyle::Chukichi => "chukichi",
            FortuneStyle::Shokichi => "shokichi",
            FortuneStyle::Kichi => "kichi",
            FortuneStyle::Hankichi => "hankichi",
            FortuneStyle::Suekichi => "suekichi",
            FortuneStyle::Hankyo => "hankyo",
            FortuneStyle::Kyo => "kyo",
            FortuneStyle::Daikyo => "daikyo",
        }
    }
}

/// Upstream reading source when the scorer answers per source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Enamae,
    Namaeuranai,
}

impl Source {
    pub fn wire_key(self) -> &'static str {
        match self {
            Source::Enamae => "enamae",
            Source::Namaeuranai => "namaeuranai",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Source::Enamae => Source::Namaeuranai,
            Source::Namaeuranai => Source::Enamae,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown source '{0}', expected 'enamae' or 'namaeuranai'")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enamae" | "enamae.net" => Ok(Source::Enamae),
            "namaeuranai" | "namaeuranai.biz" => Ok(Source::Namaeuranai),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}
