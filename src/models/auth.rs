use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(rename = "loginResult")]
    pub login_result: LoginResult,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResult {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    pub name: String,
    pub token: String,
}
