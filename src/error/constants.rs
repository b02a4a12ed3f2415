use super::const_error;

const_error! {
    #[error("E001", "SUPABASE_URL is not set")]
    #[kind(Configuration)]
    const MISSING_STORE_URL;
}

const_error! {
    #[error("E002", "SUPABASE_SERVICE_ROLE_KEY is not set")]
    #[kind(Configuration)]
    const MISSING_SERVICE_KEY;
}

const_error! {
    #[error("E003", "SUPABASE_URL is not a valid url")]
    #[kind(Configuration)]
    const INVALID_STORE_URL;
}

const_error! {
    #[error("E004", "the service key cannot be sent as a header")]
    #[kind(Configuration)]
    const INVALID_SERVICE_KEY;
}

const_error! {
    #[error("E005", "HBFL_SIM_TZ is not a known time zone")]
    #[kind(Configuration)]
    const INVALID_TIMEZONE;
}

const_error! {
    #[error("E006", "HBFL_SIM_HOUR or HBFL_SIM_MINUTE is out of range")]
    #[kind(Configuration)]
    const INVALID_SIM_TIME;
}

const_error! {
    #[error("E100", "failed to reach the store")]
    #[kind(Persistence)]
    const STORE_REQUEST;
}

const_error! {
    #[error("E101", "the store rejected the request")]
    #[kind(Persistence)]
    const STORE_RESPONSE;
}

const_error! {
    #[error("E102", "failed to decode the store response")]
    #[kind(Persistence)]
    const STORE_DECODE;
}

const_error! {
    #[error("E103", "the store is unavailable")]
    #[kind(Persistence)]
    const STORE_UNAVAILABLE;
}

const_error! {
    #[error("E104", "the store returned no rows for an insert")]
    #[kind(Persistence)]
    const STORE_EMPTY_INSERT;
}

const_error! {
    #[error("E105", "a played game has no recorded result")]
    #[kind(Persistence)]
    const UNRECORDED_GAME;
}

const_error! {
    #[error("E200", "a round robin needs an even number of teams")]
    #[kind(Validation)]
    const ODD_TEAM_COUNT;
}

const_error! {
    #[error("E201", "a round robin needs at least two teams")]
    #[kind(Validation)]
    const TOO_FEW_TEAMS;
}

const_error! {
    #[error("E202", "the league does not have exactly 8 teams")]
    #[kind(Validation)]
    const WRONG_TEAM_COUNT;
}
