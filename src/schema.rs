diesel::table! {
    settings (id) {
        id -> Integer,
        electricity_rate -> Text,
        water_rate -> Text,
        wifi_rate -> Text,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    invoices (invoice_id) {
        invoice_id -> Text,
        total_amount -> Text,
        outstanding_balance -> Text,
        due_date -> Date,
        status -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Text,
        email -> Text,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        address -> Nullable<Text>,
        contact_number -> Nullable<Text>,
        role -> Text,
        custom_id -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    id_sequences (prefix) {
        prefix -> Text,
        next_value -> Integer,
    }
}

diesel::allow_tables_to_appear_in_same_query!(settings, invoices, users, id_sequences);
