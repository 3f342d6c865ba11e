use super::*;
use crate::args;
use crate::error::SqlError;
use crate::mapper::{MapperRegistry, Tagged, TaggedField};
use crate::meta::TableMeta;
use crate::quote::placeholder_count;
use crate::value::Value;

struct User {
    id: i64,
    name: String,
    age: i32,
}

impl Tagged for User {
    fn tagged_fields() -> &'static [TaggedField] {
        &[
            TaggedField {
                name: "id",
                tags: &[("db", "id")],
            },
            TaggedField {
                name: "name",
                tags: &[("db", "name")],
            },
            TaggedField {
                name: "age",
                tags: &[("db", "age")],
            },
            TaggedField {
                name: "ctime",
                tags: &[("db", "ctime")],
            },
        ]
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "age" => Some(self.age.into()),
            "ctime" => Some(0.into()),
            _ => None,
        }
    }
}

fn alice() -> User {
    User {
        id: 1,
        name: "alice".to_string(),
        age: 20,
    }
}

// ==================== SELECT ====================

#[test]
fn test_select_all() {
    assert_eq!(select("user").sql().unwrap(), "SELECT * FROM `user`;");
}

#[test]
fn test_select_columns_where() {
    let (sql, args) = select("user")
        .columns(["id", "name"])
        .where_(c().and([col("age").gt(20)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "SELECT `id`, `name` FROM `user` WHERE `age` > ?;");
    assert_eq!(args, vec![Value::I64(20)]);
}

#[test]
fn test_disabled_predicate_elision() {
    let (sql, args) = select("user")
        .where_(c().and([col("age").gt(20), col("sex").eq("male").enable(false)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `user` WHERE `age` > ?;");
    assert_eq!(args, vec![Value::I64(20)]);
}

#[test]
fn test_disabled_first_predicate_leaves_no_stray_join() {
    let cond = c()
        .and([col("sex").eq("male").enable(false), col("age").gt(20)])
        .or([col("vip").eq(true)]);
    let (sql, args) = select("user").where_(cond).sql_args().unwrap();
    assert_eq!(sql, "SELECT * FROM `user` WHERE `age` > ? OR `vip` = ?;");
    assert_eq!(args, vec![Value::I64(20), Value::Bool(true)]);
}

#[test]
fn test_all_disabled_renders_no_where() {
    let cond = c().and([col("age").gt(20).enable(false)]);
    assert_eq!(select("user").where_(cond).sql().unwrap(), "SELECT * FROM `user`;");
}

#[test]
fn test_condition_with_constructor() {
    let cond = Condition::with([col("a").eq(1), col("b").lte(2)]);
    assert_eq!(
        select("t").where_(cond).sql().unwrap(),
        "SELECT * FROM `t` WHERE `a` = ? AND `b` <= ?;"
    );
}

#[test]
fn test_in_list_alignment() {
    let (sql, args) = select("user")
        .where_(c().and([col("id").in_list([100, 101])]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `user` WHERE `id` IN (?, ?);");
    assert_eq!(args, vec![Value::I64(100), Value::I64(101)]);
}

#[test]
fn test_empty_in_list_is_always_false() {
    let (sql, args) = select("user")
        .where_(c().and([col("id").in_list(Vec::<i64>::new()), col("age").gt(1)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `user` WHERE 1=0 AND `age` > ?;");
    assert_eq!(args, vec![Value::I64(1)]);
}

#[test]
fn test_render_is_idempotent() {
    let mut s = select("user");
    s.columns(["id"])
        .where_(c().and([col("id").in_list([1, 2, 3])]))
        .order_by([asc(["id"])])
        .limit(5);
    assert_eq!(s.sql_args().unwrap(), s.sql_args().unwrap());
    assert_eq!(s.sql().unwrap(), s.sql().unwrap());
}

#[test]
fn test_left_join_with_aliases() {
    let mut s = select("user");
    s.as_("u")
        .column_alias("u", ["id", "username"])
        .column_alias("b", ["id", "title"])
        .left_join("blog", "b", "b.`uid` = u.`id`")
        .where_(c().and([col("id").alias("u").eq(1)]));
    let (sql, args) = s.sql_args().unwrap();
    assert_eq!(
        sql,
        "SELECT u.`id`, u.`username`, b.`id`, b.`title` FROM `user` AS u \
         LEFT JOIN `blog` AS b ON b.`uid` = u.`id` WHERE u.`id` = ?;"
    );
    assert_eq!(args, vec![Value::I64(1)]);
}

#[test]
fn test_inner_and_right_join() {
    let mut s = select("user");
    s.as_("u")
        .inner_join("blog", "b", "b.`uid` = u.`id`")
        .right_join("tag", "t", "t.`bid` = b.`id`");
    assert_eq!(
        s.sql().unwrap(),
        "SELECT * FROM `user` AS u INNER JOIN `blog` AS b ON b.`uid` = u.`id` \
         RIGHT JOIN `tag` AS t ON t.`bid` = b.`id`;"
    );
}

#[test]
fn test_full_clause_order() {
    let mut s = select("user");
    s.distinct()
        .columns(["age"])
        .where_(c().and([col("age").gt(10)]))
        .group_by(["age"])
        .having(raw().where_("COUNT(*) > ?", args![1]))
        .order_by([desc(["age"])])
        .limit(10)
        .offset(20)
        .for_update(true);
    let (sql, args) = s.sql_args().unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT `age` FROM `user` WHERE `age` > ? GROUP BY `age` \
         HAVING COUNT(*) > ? ORDER BY `age` DESC LIMIT 10 OFFSET 20 FOR UPDATE;"
    );
    assert_eq!(args, vec![Value::I64(10), Value::I64(1)]);
}

#[test]
fn test_having_needs_group_by() {
    let mut s = select("user");
    s.having(raw().where_("COUNT(*) > ?", args![1]));
    assert_eq!(s.sql_args().unwrap(), ("SELECT * FROM `user`;".to_string(), vec![]));
}

#[test]
fn test_count_sql_shares_where_args() {
    let mut s = select("user");
    s.as_("u")
        .columns(["id", "name"])
        .left_join("blog", "b", "b.`uid` = u.`id`")
        .where_(c().and([col("age").gt(18), col("name").like("a%")]))
        .order_by([desc(["id"])])
        .page(2, 20);

    let (sql, args) = s.sql_args().unwrap();
    let (count_sql, count_args) = s.count_sql_args().unwrap();
    assert_eq!(
        sql,
        "SELECT `id`, `name` FROM `user` AS u LEFT JOIN `blog` AS b ON b.`uid` = u.`id` \
         WHERE `age` > ? AND `name` LIKE ? ORDER BY `id` DESC LIMIT 20 OFFSET 20;"
    );
    assert_eq!(
        count_sql,
        "SELECT COUNT(*) FROM `user` AS u LEFT JOIN `blog` AS b ON b.`uid` = u.`id` \
         WHERE `age` > ? AND `name` LIKE ?;"
    );
    assert_eq!(count_args, args);
    assert_eq!(s.count_sql().unwrap(), count_sql);
}

#[test]
fn test_page_clamps_to_first_page() {
    let mut s = select("user");
    s.page(0, 10);
    assert_eq!(s.sql().unwrap(), "SELECT * FROM `user` LIMIT 10 OFFSET 0;");
}

#[test]
fn test_query_string_overrides_projection() {
    let mut s = select("user");
    s.columns(["id"]).query_string("count(*)");
    assert_eq!(s.sql().unwrap(), "SELECT count(*) FROM `user`;");
}

#[test]
fn test_if_null_projection() {
    let mut s = select("user");
    s.columns(["id", "nickname"])
        .column_alias("b", ["title"])
        .if_null_vals([("nickname", "''"), ("title", "'none'")]);
    assert_eq!(
        s.sql().unwrap(),
        "SELECT `id`, IFNULL(`nickname`, '') AS `nickname`, \
         IFNULL(b.`title`, 'none') AS `title` FROM `user`;"
    );
}

#[test]
fn test_struct_columns_with_registry() {
    let registry = MapperRegistry::new();
    let mut s = select("user");
    s.struct_columns_in::<User>(&registry, "db", &["ctime"]);
    assert_eq!(s.sql().unwrap(), "SELECT `id`, `name`, `age` FROM `user`;");
}

#[test]
fn test_empty_table_name() {
    assert_eq!(select("").sql(), Err(SqlError::TableNameRequired));
    assert!(insert("").columns(["a"]).sql().unwrap_err().is_table_name_required());
    assert!(update("").set("a", 1).sql().unwrap_err().is_table_name_required());
    assert!(
        delete("")
            .where_(c().and([col("id").eq(1)]))
            .sql()
            .unwrap_err()
            .is_table_name_required()
    );
}

// ==================== Conditions ====================

#[test]
fn test_raw_condition() {
    let name: Option<&str> = None;
    let cond = raw()
        .where_("`age` > ?", args![18])
        .and_if(name.is_some(), "`name` = ?", args![name])
        .or("`vip` = ?", args![true]);
    let (sql, args) = select("user").where_(cond).sql_args().unwrap();
    assert_eq!(sql, "SELECT * FROM `user` WHERE `age` > ? OR `vip` = ?;");
    assert_eq!(args, vec![Value::I64(18), Value::Bool(true)]);
}

#[test]
fn test_raw_condition_first_join_is_dropped() {
    let cond = raw()
        .where_if(false, "`x` = ?", args![0])
        .and("`a` = ?", args![1])
        .and_if(true, "`b` IN (?, ?)", args![2, 3])
        .or_if(false, "`c` = ?", args![4]);
    let (sql, args) = select("t").where_(cond).sql_args().unwrap();
    assert_eq!(sql, "SELECT * FROM `t` WHERE `a` = ? AND `b` IN (?, ?);");
    assert_eq!(args.len(), 3);
}

#[test]
fn test_raw_condition_placeholder_mismatch() {
    let cond = raw().where_("`a` = ? AND `b` = ?", args![1]);
    assert_eq!(
        select("t").where_(cond).sql(),
        Err(SqlError::ArgsMismatch {
            sql: "`a` = ? AND `b` = ?".to_string(),
            placeholders: 2,
            args: 1,
        })
    );
}

#[test]
fn test_nested_groups() {
    let cond = c()
        .and([col("status").eq(1)])
        .or_group(c().and([col("role").eq("admin"), col("level").gt(3)]));
    let (sql, args) = select("user").where_(cond).sql_args().unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `user` WHERE `status` = ? OR (`role` = ? AND `level` > ?);"
    );
    assert_eq!(args, vec![Value::I64(1), Value::from("admin"), Value::I64(3)]);
}

#[test]
fn test_empty_group_is_dropped() {
    let cond = c()
        .and([col("a").eq(1)])
        .and_group(c().and([col("b").eq(2).enable(false)]));
    assert_eq!(
        select("t").where_(cond).sql().unwrap(),
        "SELECT * FROM `t` WHERE `a` = ?;"
    );
}

#[test]
fn test_and_not() {
    let cond = c().and_not(c().and([col("deleted").eq(1)]).or([col("banned").eq(1)]));
    assert_eq!(
        select("user").where_(cond).sql().unwrap(),
        "SELECT * FROM `user` WHERE NOT (`deleted` = ? OR `banned` = ?);"
    );
}

#[test]
fn test_exists_subquery() {
    let mut sub = select("blog");
    sub.query_string("1").where_(
        raw()
            .where_("`blog`.`uid` = `user`.`id`", args![])
            .and("`blog`.`status` = ?", args![1]),
    );

    let cond = c().and([col("age").gt(18)]).and_exists(&sub);
    let (sql, args) = select("user").where_(cond).sql_args().unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `user` WHERE `age` > ? AND EXISTS \
         (SELECT 1 FROM `blog` WHERE `blog`.`uid` = `user`.`id` AND `blog`.`status` = ?);"
    );
    assert_eq!(args, vec![Value::I64(18), Value::I64(1)]);

    let cond = c().and_not_exists(&sub);
    assert_eq!(
        select("user").where_(cond).sql().unwrap(),
        "SELECT * FROM `user` WHERE NOT EXISTS \
         (SELECT 1 FROM `blog` WHERE `blog`.`uid` = `user`.`id` AND `blog`.`status` = ?);"
    );
}

#[test]
fn test_group_propagates_inner_error() {
    let cond = c().and_group(raw().where_("`a` = ?", args![]));
    assert!(matches!(
        select("t").where_(cond).sql(),
        Err(SqlError::ArgsMismatch { placeholders: 1, args: 0, .. })
    ));
}

#[test]
fn test_condition_reuse_across_statements() {
    let cond = c().and([col("id").eq(7)]);
    let select_sql = select("user").where_(&cond).sql().unwrap();
    let delete_sql = delete("user").where_(&cond).sql().unwrap();
    assert_eq!(select_sql, "SELECT * FROM `user` WHERE `id` = ?;");
    assert_eq!(delete_sql, "DELETE FROM `user` WHERE `id` = ?;");
}

#[test]
fn test_predicates_expose_list_flag() {
    let cond = c().and([col("id").in_list([1, 2]), col("age").gt(1)]);
    let predicates = cond.predicates();
    assert_eq!(predicates.len(), 2);
    assert!(predicates[0].has_list_op());
    assert!(!predicates[1].has_list_op());
    assert_eq!(predicates[1].join(), Some(Op::And));
    assert_eq!(predicates[0].args().len(), 2);
}

// ==================== INSERT ====================

#[test]
fn test_insert_placeholder_modes() {
    let mut ins = insert("user");
    ins.columns(["username", "age", "sex"]);
    assert_eq!(
        ins.sql().unwrap(),
        "INSERT INTO `user`(`username`, `age`, `sex`) VALUES (?, ?, ?);"
    );
    assert_eq!(
        ins.name_sql().unwrap(),
        "INSERT INTO `user`(`username`, `age`, `sex`) VALUES (:username, :age, :sex);"
    );
    let (_, args) = ins.sql_args().unwrap();
    assert!(args.is_empty());
}

#[test]
fn test_insert_fields() {
    let (sql, args) = insert("user")
        .fields([FieldOp::val("username", "alice"), FieldOp::val("age", 18)])
        .sql_args()
        .unwrap();
    assert_eq!(sql, "INSERT INTO `user`(`username`, `age`) VALUES (?, ?);");
    assert_eq!(args, vec![Value::from("alice"), Value::I64(18)]);
}

#[test]
fn test_insert_prefix_last_setter_wins() {
    let mut ins = insert("user");
    ins.columns(["id"]).replace_into(true);
    assert_eq!(ins.sql().unwrap(), "REPLACE INTO `user`(`id`) VALUES (?);");
    ins.ignore_into(true);
    assert_eq!(ins.sql().unwrap(), "INSERT IGNORE INTO `user`(`id`) VALUES (?);");
    ins.ignore_into(false);
    assert_eq!(ins.sql().unwrap(), "INSERT INTO `user`(`id`) VALUES (?);");
}

#[test]
fn test_insert_on_duplicate_key_update() {
    let (sql, args) = insert("counter")
        .fields([FieldOp::val("id", 1), FieldOp::val("cnt", 1)])
        .on_duplicate_key_update([FieldOp::incr("cnt", 1), FieldOp::val("utime", 100)])
        .sql_args()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO `counter`(`id`, `cnt`) VALUES (?, ?) \
         ON DUPLICATE KEY UPDATE `cnt` = `cnt` + 1, `utime` = ?;"
    );
    assert_eq!(args, vec![Value::I64(1), Value::I64(1), Value::I64(100)]);

    let sql = insert("counter")
        .columns(["id"])
        .on_duplicate_key_update_string("`cnt` = `cnt` + 1")
        .name_sql()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO `counter`(`id`) VALUES (:id) ON DUPLICATE KEY UPDATE `cnt` = `cnt` + 1;"
    );
}

#[test]
fn test_insert_requires_columns() {
    let err = insert("user").sql().unwrap_err();
    assert_eq!(err, SqlError::ColumnsRequired { statement: "insert" });
    assert!(insert("user").name_sql().unwrap_err().is_columns_required());
}

#[test]
fn test_insert_bound_field_replaces_column() {
    let mut ins = insert("user");
    ins.columns(["name", "age"]).fields([FieldOp::val("age", 3)]);
    assert_eq!(
        ins.sql().unwrap(),
        "INSERT INTO `user`(`name`, `age`) VALUES (?, ?);"
    );
    assert!(matches!(
        ins.sql_args(),
        Err(SqlError::ArgsMismatch { placeholders: 2, args: 1, .. })
    ));

    ins.fields([FieldOp::val("name", "bob")]);
    let (sql, args) = ins.sql_args().unwrap();
    assert_eq!(sql, "INSERT INTO `user`(`age`, `name`) VALUES (?, ?);");
    assert_eq!(args, vec![Value::I64(3), Value::from("bob")]);
}

#[test]
fn test_insert_struct_columns_and_model() {
    let registry = MapperRegistry::new();
    let sql = insert("user")
        .struct_columns_in::<User>(&registry, "db", &["id", "ctime"])
        .name_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO `user`(`name`, `age`) VALUES (:name, :age);");

    let (sql, args) = insert("user")
        .model_in(&registry, &alice(), "db", &["ctime"])
        .sql_args()
        .unwrap();
    assert_eq!(sql, "INSERT INTO `user`(`id`, `name`, `age`) VALUES (?, ?, ?);");
    assert_eq!(args, vec![Value::I64(1), Value::from("alice"), Value::I64(20)]);
}

// ==================== UPDATE ====================

#[test]
fn test_update_set_then_where_args() {
    let (sql, args) = update("user")
        .set("a", 1)
        .set("b", "x")
        .where_(c().and([col("id").eq(3)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "UPDATE `user` SET `a` = ?, `b` = ? WHERE `id` = ?;");
    assert_eq!(args, vec![Value::I64(1), Value::from("x"), Value::I64(3)]);
}

#[test]
fn test_update_named_with_incr() {
    let sql = update("user")
        .columns(["nickname", "age"])
        .incr("version", 1)
        .where_(c().and([col("id").eq(1)]))
        .name_sql()
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE `user` SET `nickname` = :nickname, `age` = :age, \
         `version` = `version` + 1 WHERE `id` = ?;"
    );
}

#[test]
fn test_update_incr_contributes_no_arg() {
    let (sql, args) = update("user")
        .incr("age", 1)
        .where_(c().and([col("id").eq(9)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "UPDATE `user` SET `age` = `age` + 1 WHERE `id` = ?;");
    assert_eq!(args, vec![Value::I64(9)]);
}

#[test]
fn test_update_without_where() {
    assert_eq!(
        update("user").columns(["name"]).sql().unwrap(),
        "UPDATE `user` SET `name` = ?;"
    );
}

#[test]
fn test_update_requires_columns() {
    let err = update("user")
        .where_(c().and([col("id").eq(1)]))
        .sql()
        .unwrap_err();
    assert_eq!(err, SqlError::ColumnsRequired { statement: "update" });
}

#[test]
fn test_update_model() {
    let registry = MapperRegistry::new();
    let (sql, args) = update("user")
        .model_in(&registry, &alice(), "db", &["id", "ctime"])
        .where_(c().and([col("id").eq(1)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "UPDATE `user` SET `name` = ?, `age` = ? WHERE `id` = ?;");
    assert_eq!(args, vec![Value::from("alice"), Value::I64(20), Value::I64(1)]);
}

// ==================== DELETE ====================

#[test]
fn test_delete_requires_where() {
    let err = Builder::new("user").delete().sql().unwrap_err();
    assert_eq!(
        err,
        SqlError::DeleteMissingWhere {
            table: "user".to_string()
        }
    );
}

#[test]
fn test_delete_rejects_all_disabled_condition() {
    let err = delete("user")
        .where_(c().and([col("id").eq(1).enable(false)]))
        .sql_args()
        .unwrap_err();
    assert!(err.is_delete_missing_where());

    let err = delete("user").where_(raw()).sql().unwrap_err();
    assert!(err.is_delete_missing_where());
}

#[test]
fn test_delete_with_where_order_limit() {
    let (sql, args) = delete("user")
        .where_(c().and([col("age").lt(18)]))
        .order_by([asc(["ctime"])])
        .limit(100)
        .sql_args()
        .unwrap();
    assert_eq!(
        sql,
        "DELETE FROM `user` WHERE `age` < ? ORDER BY `ctime` ASC LIMIT 100;"
    );
    assert_eq!(args, vec![Value::I64(18)]);
}

// ==================== Builder / trait ====================

#[test]
fn test_builder_from_meta() {
    let meta = TableMeta::new("user")
        .with_primary_key("id", true)
        .with_columns(&["name", "age"]);
    let b = Builder::from_meta(&meta);
    assert_eq!(b.table(), "user");
    assert_eq!(
        b.insert().name_sql().unwrap(),
        "INSERT INTO `user`(`name`, `age`) VALUES (:name, :age);"
    );
    assert_eq!(
        b.update()
            .where_(c().and([col("id").eq(1)]))
            .name_sql()
            .unwrap(),
        "UPDATE `user` SET `name` = :name, `age` = :age WHERE `id` = ?;"
    );
    assert_eq!(b.select().sql().unwrap(), "SELECT * FROM `user`;");
}

#[test]
fn test_trait_interpolated() {
    let mut s = select("user");
    s.where_(c().and([col("name").eq("o'neil"), col("age").gte(3)]));
    assert_eq!(s.kind(), StatementKind::Select);
    assert_eq!(
        s.interpolated().unwrap(),
        r"SELECT * FROM `user` WHERE `name` = 'o\'neil' AND `age` >= 3;"
    );
}

#[test]
fn test_placeholders_match_args() {
    let mut sel = select("user");
    sel.where_(
        c().and([col("id").in_list([1, 2, 3]), col("x").eq(1).enable(false)])
            .or([col("name").like("%a%")])
            .and_group(raw().where_("`a` = ? OR `b` = ?", args![1, 2])),
    );
    let mut ins = insert("user");
    ins.fields([FieldOp::val("a", 1), FieldOp::incr("b", 2)])
        .on_duplicate_key_update([FieldOp::val("a", 3)]);
    let mut upd = update("user");
    upd.set("a", 1)
        .incr("b", 1)
        .where_(c().and([col("id").not_in([4, 5])]));
    let mut del = delete("user");
    del.where_(c().and([col("id").not_eq(0)]));

    let builders: [&dyn SqlBuilder; 4] = [&sel, &ins, &upd, &del];
    for b in builders {
        let (sql, args) = b.sql_args().unwrap();
        assert_eq!(placeholder_count(&sql), args.len(), "{sql}");
    }
}

// ==================== Guards ====================

#[test]
fn test_delete_rejects_always_true_condition() {
    let empty = Vec::<i64>::new();

    let err = delete("user")
        .where_(c().and([col("id").not_in(empty.clone())]))
        .sql()
        .unwrap_err();
    assert!(err.is_delete_missing_where());

    let err = delete("user")
        .where_(c().and([col("id").eq(1)]).or([col("id").not_in(empty.clone())]))
        .sql()
        .unwrap_err();
    assert!(err.is_delete_missing_where());

    let err = delete("user")
        .where_(
            c().and([col("id").eq(1)])
                .or_group(c().and([col("id").not_in(empty.clone())])),
        )
        .sql()
        .unwrap_err();
    assert!(err.is_delete_missing_where());
}

#[test]
fn test_delete_keeps_restricted_always_true_predicate() {
    let (sql, args) = delete("user")
        .where_(c().and([col("tag").not_in(Vec::<i64>::new()), col("id").eq(1)]))
        .sql_args()
        .unwrap();
    assert_eq!(sql, "DELETE FROM `user` WHERE 1=1 AND `id` = ?;");
    assert_eq!(args, vec![Value::I64(1)]);

    let sql = select("user")
        .where_(c().and([col("id").not_in(Vec::<i64>::new())]))
        .sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `user` WHERE 1=1;");
}

#[test]
fn test_first_predicate_has_no_join() {
    let cond = c().and([col("a").eq(1), col("b").eq(2)]);
    assert_eq!(cond.predicates()[0].join(), None);
    assert_eq!(cond.predicates()[1].join(), Some(Op::And));

    let cond = c()
        .or([col("a").eq(1).enable(false)])
        .or_group(c().and([col("b").eq(2)]));
    assert_eq!(cond.predicates()[0].join(), None);

    let cond = raw().and("`a` = ?", args![1]).or("`b` = ?", args![2]);
    assert_eq!(cond.predicates()[0].join(), None);
    assert_eq!(cond.predicates()[1].join(), Some(Op::Or));
}

#[test]
fn test_page_saturates_offset() {
    let mut s = select("user");
    s.page(u64::MAX, 10);
    assert_eq!(
        s.sql().unwrap(),
        format!("SELECT * FROM `user` LIMIT 10 OFFSET {};", u64::MAX)
    );
}

#[test]
fn test_columns_skip_bound_fields() {
    let mut ins = insert("user");
    ins.fields([FieldOp::val("a", 1)]).columns(["a", "b"]);
    assert_eq!(ins.sql().unwrap(), "INSERT INTO `user`(`b`, `a`) VALUES (?, ?);");

    let mut upd = update("user");
    upd.set("a", 1).columns(["a"]);
    let (sql, args) = upd.sql_args().unwrap();
    assert_eq!(sql, "UPDATE `user` SET `a` = ?;");
    assert_eq!(args, vec![Value::I64(1)]);
}

#[test]
fn test_non_finite_numbers_are_rejected() {
    let err = update("user")
        .incr("score", f64::NAN)
        .where_(c().and([col("id").eq(1)]))
        .sql()
        .unwrap_err();
    assert_eq!(
        err,
        SqlError::NonFiniteNumber {
            context: "increment of `score`".to_string()
        }
    );

    let err = insert("counter")
        .fields([FieldOp::val("id", 1)])
        .on_duplicate_key_update([FieldOp::incr("cnt", f64::INFINITY)])
        .sql_args()
        .unwrap_err();
    assert!(err.is_non_finite_number());

    let mut s = select("user");
    s.where_(c().and([col("score").gt(f64::NAN)]));
    assert!(s.sql_args().is_ok());
    assert!(s.interpolated().unwrap_err().is_non_finite_number());
}
