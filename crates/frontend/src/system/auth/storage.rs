//! Токен доступа к API хранится в localStorage.
//!
//! Выдача токена (вход) выполняется вне дашборда; здесь только чтение и сброс.

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

/// Сбросить токен после ответа 401
pub fn clear_access_token() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
    }
}
