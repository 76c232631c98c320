//! Column enums stored as lowercase strings.

use sea_orm::entity::prelude::*;

use insighto_core::domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Platform {
    #[sea_orm(string_value = "instagram")]
    Instagram,
    #[sea_orm(string_value = "twitter")]
    Twitter,
    #[sea_orm(string_value = "youtube")]
    Youtube,
    #[sea_orm(string_value = "linkedin")]
    Linkedin,
    #[sea_orm(string_value = "facebook")]
    Facebook,
    #[sea_orm(string_value = "tiktok")]
    Tiktok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PostType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "carousel")]
    Carousel,
    #[sea_orm(string_value = "story")]
    Story,
    #[sea_orm(string_value = "reel")]
    Reel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum InsightType {
    #[sea_orm(string_value = "best_time")]
    BestTime,
    #[sea_orm(string_value = "content")]
    Content,
    #[sea_orm(string_value = "audience")]
    Audience,
    #[sea_orm(string_value = "hashtags")]
    Hashtags,
    #[sea_orm(string_value = "trend")]
    Trend,
    #[sea_orm(string_value = "performance")]
    Performance,
}

macro_rules! mirror_enum {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl From<$name> for domain::$name {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => domain::$name::$variant),+
                }
            }
        }

        impl From<domain::$name> for $name {
            fn from(value: domain::$name) -> Self {
                match value {
                    $(domain::$name::$variant => $name::$variant),+
                }
            }
        }
    };
}

mirror_enum!(Platform {
    Instagram, Twitter, Youtube, Linkedin, Facebook, Tiktok
});

mirror_enum!(PostType {
    Text, Image, Video, Carousel, Story, Reel
});

mirror_enum!(InsightType {
    BestTime, Content, Audience, Hashtags, Trend, Performance
});
