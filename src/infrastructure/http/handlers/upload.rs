//! Multipart 上传解析

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::infrastructure::http::error::ApiError;

/// 一次上传：文件 + 附带的文本字段
pub struct Upload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub fields: HashMap<String, String>,
}

/// 读取 `file` 字段与其它文本字段，文件缺失或为空时报错
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            file = Some((file_name, data.to_vec()));
        } else {
            let value = field.text().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read {}: {}", field_name, e))
            })?;
            fields.insert(field_name, value);
        }
    }

    let (file_name, data) = file
        .filter(|(_, data)| !data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("文件不能为空".to_string()))?;

    Ok(Upload {
        file_name,
        data,
        fields,
    })
}
