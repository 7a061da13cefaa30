use super::*;

#[test]
fn notice_with_target_is_carried_to_the_layout() {
    let owner = Owner::new();
    owner.with(|| {
        let flash = Flash::new();
        let inline = RwSignal::new(None::<String>);
        flash.show(Notice::then_go("User created successfully!", "/dashboard/users"), inline);
        assert_eq!(inline.get_untracked(), None);
        assert_eq!(flash.message.get_untracked().as_deref(), Some("User created successfully!"));
        assert_eq!(flash.take_target(), Some("/dashboard/users"));
        assert_eq!(flash.take_target(), None);
    });
}

#[test]
fn notice_without_target_stays_inline() {
    let owner = Owner::new();
    owner.with(|| {
        let flash = Flash::new();
        let inline = RwSignal::new(None::<String>);
        flash.show(Notice::stay("User updated successfully!"), inline);
        assert_eq!(inline.get_untracked().as_deref(), Some("User updated successfully!"));
        assert_eq!(flash.message.get_untracked(), None);
        assert_eq!(flash.target.get_untracked(), None);
    });
}

#[test]
fn carried_message_clears_after_leaving_its_page() {
    let owner = Owner::new();
    owner.with(|| {
        let flash = Flash::new();
        flash.show(Notice::then_go("User deleted successfully!", "/dashboard/users"), RwSignal::new(None));

        flash.on_route("/dashboard/users");
        assert_eq!(flash.message.get_untracked().as_deref(), Some("User deleted successfully!"));

        flash.on_route("/dashboard/my-documents");
        assert_eq!(flash.message.get_untracked(), None);
    });
}

#[test]
fn route_change_without_message_is_a_no_op() {
    let owner = Owner::new();
    owner.with(|| {
        let flash = Flash::new();
        flash.on_route("/dashboard");
        assert_eq!(flash.message.get_untracked(), None);
    });
}
