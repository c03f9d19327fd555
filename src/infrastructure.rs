pub mod db {
    pub mod postgres;
}

pub mod limiter {
    pub mod rate_limiter;
}

pub mod mail {
    pub mod smtp;
}

pub mod utils {
    pub mod get_client_ip;
}
