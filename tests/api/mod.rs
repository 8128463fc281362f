mod chat_test;
