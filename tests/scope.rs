#[cfg(test)]
mod scope_tests {
    use yat::{Scope, Value, YatError};

    #[test]
    fn test_scope_set_and_get() {
        let mut scope = Scope::new();
        scope.set("a", Value::Number(7));

        assert_eq!(scope.get("a").unwrap(), Value::Number(7));
        assert!(scope.contains_local("a"));
    }

    #[test]
    fn test_scope_get_from_parent() {
        let parent = Scope::root();
        let child = Scope::child(&parent);
        parent.borrow_mut().set("a", Value::Number(7));

        assert_eq!(child.borrow().get("a").unwrap(), Value::Number(7));
        assert!(!child.borrow().contains_local("a"));
    }

    #[test]
    fn test_scope_shadowing_leaves_parent_alone() {
        let main = Scope::root();
        main.borrow_mut().set("a", Value::Number(1));
        main.borrow_mut().set("b", Value::Number(2));

        let scope = Scope::child(&main);
        scope.borrow_mut().set("a", Value::Number(3));

        assert_eq!(scope.borrow().get("a").unwrap(), Value::Number(3));
        assert_eq!(scope.borrow().get("b").unwrap(), Value::Number(2));
        assert_eq!(main.borrow().get("a").unwrap(), Value::Number(1));
    }

    #[test]
    fn test_scope_walks_several_levels() {
        let root = Scope::root();
        let middle = Scope::child(&root);
        let leaf = Scope::child(&middle);
        root.borrow_mut().set("deep", Value::Number(42));

        assert_eq!(leaf.borrow().get("deep").unwrap(), Value::Number(42));
        assert!(leaf.borrow().parent().is_some());
        assert!(root.borrow().parent().is_none());
    }

    #[test]
    fn test_scope_missing_name() {
        let root = Scope::root();
        let child = Scope::child(&root);

        match child.borrow().get("nope") {
            Err(YatError::Name(name)) => assert_eq!(name, "nope"),
            other => panic!("Expected NameError, got {:?}", other),
        };
    }

    #[test]
    fn test_scope_lookup_through_a_long_chain() {
        let root = Scope::root();
        root.borrow_mut().set("base", Value::Number(1));

        let mut chain = vec![root];
        for _ in 0..100_000 {
            let child = Scope::child(chain.last().unwrap());
            chain.push(child);
        }

        let leaf = chain.last().unwrap();
        assert_eq!(leaf.borrow().get("base").unwrap(), Value::Number(1));
        assert!(matches!(leaf.borrow().get("absent"), Err(YatError::Name(_))));

        // leaf first, so each drop only releases one level
        while let Some(scope) = chain.pop() {
            drop(scope);
        }
    }
}
