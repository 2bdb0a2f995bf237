/// Скачивание CSV из браузера
///
/// Текст CSV формирует contracts (`render_csv`), здесь только Blob и ссылка для скачивания
use crate::shared::date_utils::today;
use contracts::shared::export::{export_file_name, render_csv, ExcelExportable};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Экспортирует список в файл `prefix_dd-mm-YYYY.csv` и инициирует скачивание
pub fn export_to_excel<T: ExcelExportable>(data: &[T], prefix: &str) -> Result<(), String> {
    let content = render_csv(data).map_err(|e| e.to_string())?;
    download_csv(&content, &export_file_name(prefix, today()))
}

/// Скачать готовый CSV-текст под указанным именем
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let blob = create_csv_blob(content)?;
    download_blob(&blob, filename)
}

/// Создает Blob объект с CSV данными
fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    // Добавляем в DOM, кликаем и удаляем
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
