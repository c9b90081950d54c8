use crate::models::ClientError;
use std::fmt;
use std::str::FromStr;

// Screens of the client, addressed by the same paths the web app used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
    Register,
    Team(i64),
    User(i64),
    MyTeams,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Team(id) => write!(f, "/team/{}", id),
            Route::User(id) => write!(f, "/user/{}", id),
            Route::MyTeams => write!(f, "/user/my-teams"),
        }
    }
}

impl FromStr for Route {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let parse_id = |raw: &str| {
            raw.parse::<i64>()
                .map_err(|_| ClientError::Validation(format!("'{}' is not a valid id in route {}", raw, s)))
        };

        match segments.as_slice() {
            ["dashboard"] | [] => Ok(Route::Dashboard),
            ["login"] => Ok(Route::Login),
            ["register"] => Ok(Route::Register),
            ["user", "my-teams"] => Ok(Route::MyTeams),
            ["team", id] => Ok(Route::Team(parse_id(*id)?)),
            ["user", id] => Ok(Route::User(parse_id(*id)?)),
            _ => Err(ClientError::Validation(format!("Unknown route: {}", s))),
        }
    }
}
