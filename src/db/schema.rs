diesel::table! {
    conference (acronym) {
        acronym -> Text,
        name -> Text,
        location -> Text,
        homepage_url -> Text,
    }
}

diesel::table! {
    article (article_id) {
        article_id -> BigInt,
        title -> Text,
        conference_acronym -> Text,
    }
}

diesel::table! {
    review (code) {
        code -> Text,
        originality -> Nullable<Integer>,
        significance -> Nullable<Integer>,
        quality -> Nullable<Integer>,
        comments -> Nullable<Text>,
        content -> Nullable<Text>,
        reviewer_code -> Text,
        article_id -> BigInt,
    }
}

diesel::joinable!(review -> article (article_id));

diesel::allow_tables_to_appear_in_same_query!(article, conference, review);
