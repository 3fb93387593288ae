use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Product;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub name: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    #[sea_orm(column_type = "JsonBinary")]
    pub attributes: Json, // JSONB object, never null
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        let attributes = match model.attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            id: Some(model.id),
            name: model.name,
            price: model.price,
            attributes,
        }
    }
}

// An unset id is left to the identity column
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: product.id.map_or(NotSet, Set),
            name: Set(product.name),
            price: Set(product.price),
            attributes: Set(Value::Object(product.attributes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_into_product() {
        let model = Model {
            id: 3,
            name: Some("Widget".to_string()),
            price: Some(9.99),
            attributes: json!({"sku": "W-1"}),
        };

        let product: Product = model.into();
        assert_eq!(product.id, Some(3));
        assert_eq!(product.attributes["sku"], json!("W-1"));
    }

    #[test]
    fn test_product_without_id_leaves_id_unset() {
        let active: ActiveModel = Product::new("Widget", 9.99).into();

        assert!(active.id.is_not_set());
        assert_eq!(active.name, Set(Some("Widget".to_string())));
        assert_eq!(active.attributes, Set(json!({})));
    }
}
