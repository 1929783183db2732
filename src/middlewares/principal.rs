//! 当前请求的认证主体
//!
//! 由 [`RequireJWT`](super::RequireJWT) 放入请求扩展，处理函数以参数形式显式取得，
//! 再传给业务层。没有经过认证中间件的请求会得到 401。

use std::ops::Deref;

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use super::create_error_response;
use crate::models::users::entities::User;

#[derive(Debug, Clone)]
pub struct Principal(pub User);

impl Principal {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for Principal {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Principal {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<User>() {
            Some(user) => Ok(Principal(user.clone())),
            None => Err(InternalError::from_response(
                "missing principal",
                create_error_response(StatusCode::UNAUTHORIZED, "Unauthorized: login required"),
            )
            .into()),
        };
        ready(result)
    }
}
