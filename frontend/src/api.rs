use gloo_net::http::Request;

use crate::error::DeleteError;

pub async fn delete_transaction(url: &str) -> Result<(), DeleteError> {
    let resp = Request::delete(url)
        .header("Content-Type", "application/json")
        .send()
        .await?;
    status_result(resp.status())
}

fn status_result(status: u16) -> Result<(), DeleteError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(DeleteError::Status(status))
    }
}
