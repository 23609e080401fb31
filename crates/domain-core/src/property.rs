//! 属性目录

/// 属性目录默认分隔符
pub const DEFAULT_CATALOG_DELIMITER: char = ',';

/// 拆分属性目录，丢弃空段
///
/// 以空 key 查询得到的目录是一个分隔的字符串；空目录返回空列表
pub fn split_catalog(catalog: &str, delimiter: char) -> Vec<&str> {
    catalog
        .split(delimiter)
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .collect()
}

/// 属性查询结果的控制台渲染
pub fn render_property(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{}: {}", key, value),
        None => format!("Could not get value for \"{}\".", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_catalog() {
        assert_eq!(
            split_catalog("itemid,itemdefid, quantity", ','),
            vec!["itemid", "itemdefid", "quantity"]
        );
        assert!(split_catalog("", ',').is_empty());
        assert_eq!(split_catalog("a,,b,", ','), vec!["a", "b"]);
    }

    #[test]
    fn test_render_property() {
        assert_eq!(render_property("name", Some("Hat")), "name: Hat");
        assert_eq!(
            render_property("color", None),
            "Could not get value for \"color\"."
        );
    }
}
