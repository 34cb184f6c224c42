//! Mapping shared by the document-line backed movement sources.

mod model;

pub use model::{date_key, into_movements, MovementLineDB};

/// Declares a movement source over one document family: a `lines` table
/// joined to its `documents` header table, filtered on the header's `date`
/// column. Each family is a single invocation.
macro_rules! document_movement_source {
    (
        $(#[$meta:meta])*
        $name:ident => $movement_type:ident {
            lines: $lines:ident,
            documents: $documents:ident,
            date: $date:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            pool: ::std::sync::Arc<$crate::db::DbPool>,
        }

        impl $name {
            pub fn new(pool: ::std::sync::Arc<$crate::db::DbPool>) -> Self {
                Self { pool }
            }

            fn load_lines(
                conn: &mut ::diesel::sqlite::SqliteConnection,
                item_id: i64,
                window: ::stockledger_core::movements::MovementWindow,
            ) -> ::stockledger_core::Result<Vec<$crate::movements::MovementLineDB>> {
                use ::diesel::prelude::*;
                use $crate::errors::IntoCore;
                use $crate::movements::date_key;
                use $crate::schema::{$documents, $lines};

                let mut query = $lines::table
                    .inner_join($documents::table)
                    .filter($lines::item_id.eq(item_id))
                    .filter($documents::$date.le(date_key(window.until)))
                    .select((
                        $documents::$date,
                        $documents::reference_no,
                        $lines::id,
                        $lines::quantity,
                        $lines::amount,
                    ))
                    .order(($documents::$date.asc(), $lines::id.asc()))
                    .into_boxed();

                if let Some(from) = window.from {
                    query = query.filter($documents::$date.ge(date_key(from)));
                }

                query
                    .load::<$crate::movements::MovementLineDB>(conn)
                    .into_core()
            }
        }

        #[::async_trait::async_trait]
        impl ::stockledger_core::movements::MovementSourceTrait for $name {
            fn movement_type(&self) -> ::stockledger_core::movements::MovementType {
                ::stockledger_core::movements::MovementType::$movement_type
            }

            async fn fetch_movements(
                &self,
                item_id: i64,
                window: ::stockledger_core::movements::MovementWindow,
            ) -> ::stockledger_core::Result<Vec<::stockledger_core::movements::Movement>> {
                $crate::db::read_blocking(self.pool.clone(), move |conn| {
                    let lines = $name::load_lines(conn, item_id, window)?;
                    $crate::movements::into_movements(
                        lines,
                        ::stockledger_core::movements::MovementType::$movement_type,
                    )
                })
                .await
            }
        }
    };
}

pub(crate) use document_movement_source;
