mod test_disconnect_cleanup;
