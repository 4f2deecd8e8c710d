//! MySQL adapter. Placeholders are rewritten to `?`.

use sqlx::mysql::{MySql, MySqlRow};

define_backend!(MySql, MySqlRow, Question);
